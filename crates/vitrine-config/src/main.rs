#![forbid(unsafe_code)]

//! `vitrine-config` binary entry point.

use vitrine_config::cli::Opts;
use vitrine_config::{ConfigError, SiteConfig, generate, generate_example};

fn status(value: &str, required: bool) -> &'static str {
    match (value.is_empty(), required) {
        (false, _) => "set",
        (true, true) => "missing",
        (true, false) => "unset (optional)",
    }
}

fn main() {
    vitrine_core::logging::init_subscriber();
    let opts = Opts::parse();

    let result = if opts.example {
        generate_example(&opts.out)
    } else {
        let config = SiteConfig::from_process_env();
        tracing::info!(
            google_script_url = status(&config.google_script_url, true),
            google_analytics_id = status(&config.google_analytics_id, false),
            facebook_pixel_id = status(&config.facebook_pixel_id, false),
            "environment"
        );
        generate(&opts.out, &config)
    };

    match result {
        Ok(()) => tracing::info!(path = %opts.out.display(), "config ready"),
        Err(err @ ConfigError::MissingScriptUrl) => {
            tracing::error!("config.js written without a script URL");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
        Err(err) => {
            tracing::error!(error = %err, "config generation failed");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
