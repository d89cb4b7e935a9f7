//! site-lingo 命令行入口

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use site_lingo::config::constants::{
    KEY_EMPTY_QUERY, KEY_NO_RESULTS, KEY_RESULTS_TITLE, LANGUAGE_PREFERENCE_KEY,
};
use site_lingo::core::{build_preferences, system_locale};
use site_lingo::env::{self, EnvVar};
use site_lingo::error::helpers;
use site_lingo::i18n::LanguageSettings;
use site_lingo::{
    ConfigManager, DomResultView, LingoError, LingoResult, SearchOutcome, Site, SiteConfig,
};

#[derive(Parser)]
#[command(name = "site-lingo", version, about = "静态站点的界面多语言与站内搜索")]
struct Cli {
    /// 配置文件路径（默认按搜索路径查找）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 站点根 URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// 本地站点目录
    #[arg(long, global = true)]
    site_root: Option<PathBuf>,

    /// 参与搜索的页面，逗号分隔
    #[arg(long, global = true, value_delimiter = ',')]
    pages: Vec<String>,

    /// 语言偏好文件
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 在配置的页面中搜索
    Search {
        query: String,

        #[arg(long)]
        lang: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// 翻译本地 HTML 文件并输出
    Translate {
        file: PathBuf,

        #[arg(long)]
        lang: Option<String>,
    },
    /// 列出支持的语言
    Languages,
    /// 列出可用的环境变量
    Env,
    /// 生成示例配置文件
    InitConfig {
        #[arg(default_value = "site-lingo.toml")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Text,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            helpers::log_error(&e);
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let level = env::core::LogLevel::get_or_default("info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(format!("site_lingo={}", level))
                }),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> LingoResult<ExitCode> {
    if let Command::Env = cli.command {
        for (name, description) in env::documented_variables() {
            println!("{:<32} {}", name, description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Command::InitConfig { path } = &cli.command {
        ConfigManager::generate_example_config(path)?;
        println!("已生成 {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    let locale = system_locale();

    match cli.command {
        Command::Search {
            query,
            lang,
            format,
        } => {
            let site = Site::from_config(config, locale.as_deref())?;
            match lang {
                Some(lang) => site.use_language(&lang).await?,
                None => site.load_current_language().await,
            }

            let view = DomResultView::search_page(
                &site.store().translate_key(KEY_RESULTS_TITLE),
                &site.config().results_heading_tag,
            );
            let outcome = site.search(&query, &view).await;

            match format {
                OutputFormat::Html => println!("{}", view.container_html()),
                OutputFormat::Text => match &outcome {
                    SearchOutcome::Results(results) => {
                        for result in results {
                            println!("{}\t{}", result.page, result.snippet);
                        }
                    }
                    SearchOutcome::EmptyQuery => {
                        println!("{}", site.store().translate_key(KEY_EMPTY_QUERY))
                    }
                    SearchOutcome::NoResults => {
                        println!("{}", site.store().translate_key(KEY_NO_RESULTS))
                    }
                    SearchOutcome::Failed(message) => eprintln!("搜索失败: {}", message),
                    SearchOutcome::Superseded => {}
                },
            }

            Ok(match outcome {
                SearchOutcome::Failed(_) => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Command::Translate { file, lang } => {
            let html = tokio::fs::read_to_string(&file)
                .await
                .map_err(|e| LingoError::from(e).with_context(file.display()))?;

            let site = Site::from_config(config, locale.as_deref())?;
            if let Some(lang) = lang {
                site.use_language(&lang).await?;
            }

            println!("{}", site.translate_html(&html).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Languages => {
            let languages = LanguageSettings::from_config(&config);
            let preferences = build_preferences(&config);
            let stored = preferences.get(LANGUAGE_PREFERENCE_KEY);
            let active = languages.resolve_initial(stored.as_deref(), locale.as_deref());

            for code in languages.supported() {
                let marker = if *code == active { "*" } else { " " };
                println!("{} {}", marker, code);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Env | Command::InitConfig { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// 配置文件 + 环境变量 + 命令行参数
fn load_config(cli: &Cli) -> LingoResult<SiteConfig> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::from_file(path)?,
        None => ConfigManager::new()?,
    };
    let mut config = manager.into_config();

    if let Some(base_url) = &cli.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(site_root) = &cli.site_root {
        config.site_root = Some(site_root.clone());
    }
    if !cli.pages.is_empty() {
        config.pages = cli.pages.clone();
    }
    if let Some(preferences) = &cli.preferences {
        config.preferences_path = Some(preferences.clone());
    }

    config.validate()?;
    Ok(config)
}
