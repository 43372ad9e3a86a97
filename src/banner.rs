//! Startup banner and session summary display.

use crate::consts::{HOMEPAGE, REPO};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub base_url: &'a str,
    pub db: &'a str,
    pub timeout: Option<u64>,
}

/// Counts of what happened this session, shown at exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub generated: u64,
    pub failed: u64,
}

impl SessionStats {
    pub fn total(&self) -> u64 {
        self.generated + self.failed
    }
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    let timeout = match info.timeout {
        Some(secs) => format!("{secs}s"),
        None => "none".to_string(),
    };
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║               R E E L                 ║
   ║      a topic in, a video out          ║
   ╚═══════════════════════════════════════╝

   version  {}
   home     {}
   repo     {}
   service  {}
   timeout  {}
   db       {}
"#,
        env!("CARGO_PKG_VERSION"),
        HOMEPAGE,
        REPO,
        info.base_url,
        timeout,
        info.db,
    );
}

/// Print the session summary (generation counts + farewell).
pub fn print_session_summary(stats: SessionStats) {
    if stats.total() > 0 {
        println!(
            "session: {} generated, {} failed",
            stats.generated, stats.failed
        );
    }
    println!("goodbye.");
}
