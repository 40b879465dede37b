use clap::Parser;
use pressure_vessel_toolbox::cli::Cli;
use pressure_vessel_toolbox::{app, config, i18n};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() {
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류/Error: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = match cli.config.as_deref() {
        Some(path) => config::load_or_default_from(path)?,
        None => config::load_or_default()?,
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, None);
    match &cli.command {
        Some(command) => app::run_command(command, &cfg, &tr, cli.verbose)?,
        None => app::run(&mut cfg, &tr, cli.verbose)?,
    }
    Ok(())
}
