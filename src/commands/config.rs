use anyhow::Result;
use bday_core::{BackendKind, BdayConfig};
use owo_colors::OwoColorize;

pub fn run(config: &BdayConfig) -> Result<()> {
    let config_path = BdayConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", config.data_path().display());

    println!();
    println!("{}", "Settings".bold());
    println!("  Backend:    {}", config.backend);
    match (&config.backend, &config.api_url) {
        (_, Some(url)) => println!("  API URL:    {}", url),
        (BackendKind::Remote, None) => {
            println!("  API URL:    {}", "not set (set api_url or BDAY_API_URL)".red())
        }
        (BackendKind::Local, None) => println!("  API URL:    {}", "not set".dimmed()),
    }
    println!("  Upcoming:   next {} days", config.upcoming_days);
    println!("  Timeout:    {}s", config.request_timeout_secs);

    Ok(())
}
