use std::sync::Arc;

use marketmap::config::Config;
use marketmap::loader::FileSource;
use marketmap::services::render_service::RenderService;
use marketmap::util;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 创建快照数据源
    let source = FileSource::new("data");

    // 获取最新交易日期
    let date = match source.latest_date().await? {
        Some(date) => {
            println!("最新交易日期: {}", date);
            date
        }
        None => {
            println!("无法获取最新交易日期");
            return Ok(());
        }
    };

    // 创建渲染服务
    let config = Config::new().with_emit_page(true).with_output_dir("demo_output");
    let service = RenderService::new(config, Arc::new(source));

    // 查看快照概况
    let summary = service.inspect(&date, 5).await?;
    println!("\n快照日期: {}", summary.date);
    println!("分類數: {}", summary.groups);
    println!("個股數: {}", summary.leaves);
    println!("總成交金額: {}", util::abbr_number(summary.total_trade_value));

    // 显示成交金额前5名
    println!("\n成交金額前5名:");
    println!("{:<8} {:<12} {:<10} {:<10} {:<12}", "代號", "名稱", "收盤", "漲跌", "成交金額");
    println!("{:-<56}", "");
    for entry in &summary.top_by_value {
        println!(
            "{:<8} {:<12} {:<10.2} {:<10} {:<12}",
            entry.code,
            entry.name,
            entry.closing_price,
            entry.change,
            util::abbr_number(entry.trade_value)
        );
    }

    // 渲染整页行情树状图并写盘
    let path = service.render_to_file(&date).await?;
    println!("\n已输出: {}", path.display());

    Ok(())
}
