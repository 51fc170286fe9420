use clap::Parser;
use hashtag_diagnosis::{cli, config, dictionary, error, export, extractor, pipeline, report};
use cli::{Cli, Commands, OutputFormat};
use config::{Config, DictionarySource};
use error::Result;
use pipeline::DiagnosisRun;

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Diagnose { html, dictionary, use_default, output, format, no_ranking } => {
            println!("✅ hashtag-diag - 해시태그 분류 실패 진단\n");

            let run = DiagnosisRun {
                title_source: Some(html),
                dictionary: DictionarySource::resolve(dictionary, use_default, &config),
            };
            if let Some(DictionarySource::Default(path)) = &run.dictionary {
                println!("📥 既定辞書を適用: {}", path.display());
            }

            println!("[1/3] 辞書とタイトルを読み込み中...");
            let report = pipeline::run_diagnosis(&run, &config)?;
            println!(
                "✔ タグ{}件 / 公告{}件中 未分類{}件",
                report.tag_count, report.extraction.items, report.extraction.candidates
            );
            if report.dictionary_skipped_rows > 0 {
                println!("⚠ タグが空の辞書行を{}件スキップしました", report.dictionary_skipped_rows);
            }

            println!("\n[2/3] 診断結果");
            println!("✔ {}件の診断完了\n", report.results.len());

            println!("[3/3] 結果を保存中...");
            let format = match format {
                Some(format) => format,
                None => config
                    .default_format
                    .parse::<OutputFormat>()
                    .map_err(error::DiagnosisError::Config)?,
            };
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            export::export_results(&report.results, &format, &output_dir)?;

            if !no_ranking {
                println!();
                report::print_rankings(&report.results);
            }

            println!("✅ 完了");
        }

        Commands::Extract { html } => {
            let selectors = extractor::Selectors::from_config(&config)?;
            let extraction = extractor::extract_from_path(&html, &selectors)?;
            let titles = extraction.candidate_titles();

            for (i, title) in titles.iter().enumerate() {
                println!("{:>4}. {}", i + 1, title);
            }

            let stats = extraction.stats();
            println!(
                "\n公告{}件 / 付与済み{}件 / タイトルなし{}件 / 診断対象{}件",
                stats.items, stats.tagged, stats.untitled, stats.candidates
            );
        }

        Commands::Dictionary { path } => {
            let loaded = dictionary::load_dictionary(&path)?;

            for rule in loaded.rules.iter() {
                println!("#{}", rule.tag);
                println!("  하위키워드: {}", rule.includes.join(", "));
                if !rule.excludes.is_empty() {
                    println!("  예외키워드: {}", rule.excludes.join(", "));
                }
            }

            println!("\nタグ{}件", loaded.rules.len());
            if loaded.skipped_rows > 0 {
                println!("⚠ タグが空の行を{}件スキップ", loaded.skipped_rows);
            }
        }

        Commands::Config { set_default_dictionary, show } => {
            let mut config = config;

            if let Some(path) = set_default_dictionary {
                config.set_default_dictionary(path)?;
                println!("✔ 既定辞書を設定しました");
            }

            if show {
                println!("設定:");
                println!("  既定辞書: {}", config.default_dictionary.display());
                println!("  公告セレクタ: {}", config.item_selector);
                println!("  タイトルセレクタ: {}", config.title_selector);
                println!("  ハッシュタグセレクタ: {}", config.hashtag_selector);
                println!("  出力形式: {}", config.default_format);
            }
        }
    }

    Ok(())
}
