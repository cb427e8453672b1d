//! 命令行入口
//!
//! 读取 HTML 文件，按词典切换若干次，输出序列化后的文档。

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use dom_translate::env::{self, EnvVar};
use dom_translate::parsers::{html_to_dom, serialize_document};
use dom_translate::translation::{
    load_translation_config, ConfigManager, DictionaryLookup, ToggleOutcome, TranslationConfig,
    TranslationService,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dom-translate", version, about)]
struct Cli {
    /// HTML file to translate
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Dictionary file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    dictionary: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Character encoding of the input document
    #[arg(short, long, default_value = "utf-8")]
    encoding: String,

    /// How many times to toggle between original and translated text
    #[arg(long, default_value_t = 1)]
    toggles: usize,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

fn init_logging(cli_level: Option<CliLogLevel>) {
    let level = match cli_level {
        Some(level) => level.into(),
        None => env::core::LogLevel::get()
            .ok()
            .and_then(|value| value.parse::<Level>().ok())
            .unwrap_or(Level::INFO),
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// 显式指定的配置文件出错时直接失败，自动搜索到的配置出错时回退到默认值
fn load_config(path: Option<&str>) -> Result<TranslationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ConfigManager::from_file(path)?.into_config()),
        None => Ok(load_translation_config()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = load_config(cli.config.as_deref())?;

    let dictionary_path = cli.dictionary.clone().or_else(|| config.dictionary_path.clone());
    let lookup = match dictionary_path {
        Some(path) => DictionaryLookup::load_from_file(shellexpand::tilde(&path).as_ref())?,
        None => {
            tracing::warn!("未指定词典，文本将保持原样");
            DictionaryLookup::new()
        }
    };

    let data = fs::read(&cli.input)?;
    let dom = html_to_dom(&data, &cli.encoding)?;
    let service = TranslationService::from_dom(&dom, lookup, config)?;

    for _ in 0..cli.toggles {
        if let ToggleOutcome::Failed(e) = service.toggle().await {
            return Err(e.into());
        }
    }

    let result = serialize_document(&dom, &cli.encoding)?;
    match &cli.output {
        Some(path) => fs::write(path, &result)?,
        None => io::stdout().write_all(&result)?,
    }

    eprintln!("mode: {}", service.mode());
    Ok(())
}
