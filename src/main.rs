use anyhow::Result;
use clap::Parser;
use log::{error, info, LevelFilter};
use sitedork::sources::get_all_sources;
use sitedork::{Args, Config, DorkEngine};
use std::process;

const BANNER: &str = r#"
     _______. __  .___________. _______  _______   ______   .______       __  ___
    /       ||  | |           ||   ____||       \ /  __  \  |   _  \     |  |/  /
   |   (----`|  | `---|  |----`|  |__   |  .--.  |  |  |  | |  |_)  |    |  '  /
    \   \    |  |     |  |     |   __|  |  |  |  |  |  |  | |      /     |    <
.----)   |   |  |     |  |     |  |____ |  '--'  |  `--'  | |  |\  \----.|  .  \
|_______/    |__|     |__|     |_______||_______/ \______/  | _| `._____||__|\__\

            Search engine dorks for domains, files and emails
"#;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let level = if args.silent {
        LevelFilter::Warn
    } else if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if !args.silent {
        println!("{}", BANNER);
    }

    if args.list_engines {
        list_engines();
        return Ok(());
    }

    let Some(domain) = args.domain.clone() else {
        error!("No domain provided. Use -d <domain>");
        process::exit(1);
    };

    let engine = match DorkEngine::from_args(&args) {
        Ok(engine) => engine,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let categories = args.categories();

    tokio::select! {
        result = engine.run(&domain, args.limit, &categories) => {
            let stats = result?;
            info!(
                "Finished {} queries for {}: {} entries written in {:.2}s",
                stats.reports.len(),
                domain,
                stats.items_written(),
                stats.duration.as_secs_f64()
            );
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nYou pressed the Ctrl+C.");
            process::exit(0);
        }
    }

    Ok(())
}

fn list_engines() {
    let config = Config::default();

    for source in get_all_sources(&config) {
        let info = source.info();
        let marker = if info.resolves_redirects { " *" } else { "" };
        println!(
            "{}{} (prefix: {}, max {} results per page)",
            info.name, marker, info.prefix, info.per_page_max
        );
        for dork in source.dorks() {
            println!("  {:<10} {}", dork.category.as_str(), dork.template.replace("{}", "<domain>"));
        }
        println!();
    }

    println!("* = result links are followed to their final destination");
}
