use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 終端機用的精簡格式
    Compact,
    /// 一行一筆 JSON，方便交給 log 收集器
    Json,
}

fn booking_filter(verbose: bool) -> EnvFilter {
    let directive = if verbose {
        "homam_booking=debug,warn"
    } else {
        "homam_booking=info,warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

fn compact_subscriber(verbose: bool) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(booking_filter(verbose)).with(
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    )
}

fn json_subscriber(verbose: bool) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(booking_filter(verbose)).with(
        fmt::layer()
            .with_target(true)
            .json()
            .with_current_span(false)
            .flatten_event(true),
    )
}

/// 安裝全域 subscriber；`RUST_LOG` 優先於 verbose 旗標
pub fn init_logger(format: LogFormat, verbose: bool) {
    match format {
        LogFormat::Compact => compact_subscriber(verbose).init(),
        LogFormat::Json => json_subscriber(verbose).init(),
    }
}
