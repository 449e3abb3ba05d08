use crate::cli::config::report_config_error;
use crate::conf::load_config;
use owo_colors::OwoColorize;

pub fn check() -> anyhow::Result<()> {
    match load_config() {
        Ok(validated) => {
            let cfg = &validated.config;
            println!("{} Environment loaded successfully", "✔".green());
            println!("{} listening on {}", "✔".green(), cfg.listen_addr());
            println!(
                "{} proxy trust {}",
                "✔".green(),
                if cfg.proxy.enabled {
                    format!("enabled ({} trusted networks)", cfg.proxy.trusted_proxies.len())
                } else {
                    "disabled".to_string()
                }
            );
            println!("{} geolocation endpoint {}", "✔".green(), cfg.geo.endpoint);

            for warning in &validated.warnings {
                println!("{} {}", "⚠".yellow(), warning);
            }

            Ok(())
        }
        Err(err) => {
            report_config_error(&err);
            std::process::exit(1);
        }
    }
}
