// SPDX-License-Identifier: MPL-2.0
use pdf_lens::app::{self, Flags};
use pdf_lens::config::paths;
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};

const HELP: &str = "\
pdf_lens - upload and view PDF documents

USAGE:
  pdf_lens [OPTIONS] [FILE]

OPTIONS:
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --config-dir <DIR>    Directory holding settings.toml
  -v, --verbose         Debug logging
  -h, --help            Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let verbose = args.contains(["-v", "--verbose"]);
    init_logging(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        log::warn!("Ignoring --lang: {}", err);
        None
    });
    let config_dir: Option<String> =
        args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
            log::warn!("Ignoring --config-dir: {}", err);
            None
        });
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    paths::init_cli_override(config_dir);

    log::info!("Starting pdf_lens {}", env!("CARGO_PKG_VERSION"));
    app::run(Flags { lang, file_path })
}

fn init_logging(level: LevelFilter) {
    let config = Config::default();
    if TermLogger::init(level, config.clone(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        let _ = SimpleLogger::init(level, config);
    }
}
