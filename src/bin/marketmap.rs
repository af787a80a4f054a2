use marketmap::config::Config;
use marketmap::loader::{FileSource, HttpSource, SnapshotSource};
use marketmap::services::render_service::RenderService;
use marketmap::util;

use clap::{App, Arg, SubCommand};
use log::{error, info};
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let today = util::today_taipei().format("%Y-%m-%d").to_string();

    // 创建基本的命令行应用
    let app = App::new("MarketMap")
        .version("0.3.1")
        .author("MarketMap Team")
        .about("Taiwan stock market daily treemap renderer");

    // 在开发模式下添加调试参数
    #[cfg(debug_assertions)]
    let app = app
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Enable debug mode")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("debug-limit")
                .long("debug-limit")
                .help("Limit the number of children per group in debug mode")
                .takes_value(true)
                .default_value("10"),
        );

    // 添加子命令
    let app = app
        .subcommand(
            SubCommand::with_name("render")
                .about("Render the market treemap for a trading day")
                .arg(
                    Arg::with_name("date")
                        .short('d')
                        .long("date")
                        .value_name("DATE")
                        .help("Trading day to render (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value(&today),
                )
                .arg(
                    Arg::with_name("data-dir")
                        .long("data-dir")
                        .value_name("DIR")
                        .help("Directory holding daily snapshot files")
                        .takes_value(true)
                        .default_value("data"),
                )
                .arg(
                    Arg::with_name("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Fetch snapshots from this static host instead of the local directory")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("width")
                        .short('w')
                        .long("width")
                        .value_name("PX")
                        .help("Viewport width in pixels")
                        .takes_value(true)
                        .default_value("800"),
                )
                .arg(
                    Arg::with_name("height")
                        .long("height")
                        .value_name("PX")
                        .help("Viewport height in pixels")
                        .takes_value(true)
                        .default_value("1920"),
                )
                .arg(
                    Arg::with_name("output-dir")
                        .short('o')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory to write the rendered document into")
                        .takes_value(true)
                        .default_value("."),
                )
                .arg(
                    Arg::with_name("page")
                        .long("page")
                        .help("Emit a standalone HTML page with the hover tooltip instead of bare SVG")
                        .takes_value(false),
                ),
        )
        .subcommand(
            SubCommand::with_name("inspect")
                .about("Summarize a daily snapshot")
                .arg(
                    Arg::with_name("date")
                        .short('d')
                        .long("date")
                        .value_name("DATE")
                        .help("Trading day to inspect (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value(&today),
                )
                .arg(
                    Arg::with_name("data-dir")
                        .long("data-dir")
                        .value_name("DIR")
                        .help("Directory holding daily snapshot files")
                        .takes_value(true)
                        .default_value("data"),
                )
                .arg(
                    Arg::with_name("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Fetch snapshots from this static host instead of the local directory")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("limit")
                        .short('l')
                        .long("limit")
                        .value_name("LIMIT")
                        .help("Number of top stocks by trade value to display")
                        .takes_value(true)
                        .default_value("10"),
                ),
        )
        .subcommand(
            SubCommand::with_name("latest")
                .about("Print the most recent snapshot date in the data directory")
                .arg(
                    Arg::with_name("data-dir")
                        .long("data-dir")
                        .value_name("DIR")
                        .help("Directory holding daily snapshot files")
                        .takes_value(true)
                        .default_value("data"),
                ),
        );

    let matches = app.get_matches();

    // 获取调试模式设置
    #[cfg(debug_assertions)]
    let debug_mode = matches.is_present("debug");
    #[cfg(not(debug_assertions))]
    let debug_mode = false;

    #[cfg(debug_assertions)]
    let debug_group_limit = matches
        .value_of("debug-limit")
        .unwrap_or("10")
        .parse::<usize>()
        .unwrap_or(10);
    #[cfg(not(debug_assertions))]
    let debug_group_limit = usize::MAX;

    if let Some(matches) = matches.subcommand_matches("render") {
        let date = util::parse_date(matches.value_of("date").unwrap())?;
        let width = matches.value_of("width").unwrap_or("800").parse::<f64>().unwrap_or(800.0);
        let height =
            matches.value_of("height").unwrap_or("1920").parse::<f64>().unwrap_or(1920.0);

        let mut config = Config::new()
            .with_debug_mode(debug_mode)
            .with_debug_group_limit(debug_group_limit)
            .with_data_dir(matches.value_of("data-dir").unwrap())
            .with_output_dir(matches.value_of("output-dir").unwrap())
            .with_viewport(width, height)
            .with_emit_page(matches.is_present("page"));
        if let Some(url) = matches.value_of("base-url") {
            config = config.with_base_url(url);
        }

        let source = build_source(&config)?;
        let service = RenderService::new(config, source);

        let path = service.render_to_file(&date).await?;
        info!("Market map for {} written", date);
        println!("{}", path.display());
    } else if let Some(matches) = matches.subcommand_matches("inspect") {
        let date = util::parse_date(matches.value_of("date").unwrap())?;
        let limit = matches.value_of("limit").unwrap_or("10").parse::<usize>().unwrap_or(10);

        let mut config = Config::new().with_data_dir(matches.value_of("data-dir").unwrap());
        if let Some(url) = matches.value_of("base-url") {
            config = config.with_base_url(url);
        }
        let source = build_source(&config)?;
        let service = RenderService::new(config, source);

        let summary = service.inspect(&date, limit).await?;
        println!("快照日期: {}", summary.date);
        println!("分類數: {}  個股數: {}", summary.groups, summary.leaves);
        println!("總成交金額: {}", util::abbr_number(summary.total_trade_value));
        println!("{:-<64}", "");
        println!(
            "{:<8} {:<10} {:>10} {:>8} {:>12}",
            "代號", "名稱", "收盤", "漲跌", "成交金額"
        );
        println!("{:-<64}", "");
        for entry in &summary.top_by_value {
            println!(
                "{:<8} {:<10} {:>10.2} {:>8} {:>12}",
                entry.code,
                entry.name,
                entry.closing_price,
                entry.change,
                util::abbr_number(entry.trade_value)
            );
        }
    } else if let Some(matches) = matches.subcommand_matches("latest") {
        let data_dir = matches.value_of("data-dir").unwrap();
        let source = FileSource::new(data_dir);
        match source.latest_date().await? {
            Some(date) => {
                println!("最新交易日期: {}", date);
            }
            None => {
                error!("No snapshots found in {}", data_dir);
                return Err(format!("no snapshots in {}", data_dir).into());
            }
        }
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}

// base-url给了走HTTP静态站，否则读本地快照目录
fn build_source(config: &Config) -> Result<Arc<dyn SnapshotSource>, Box<dyn Error>> {
    match config.base_url.as_deref() {
        Some(url) => Ok(Arc::new(HttpSource::new(url)?)),
        None => Ok(Arc::new(FileSource::new(config.data_dir.as_str()))),
    }
}
