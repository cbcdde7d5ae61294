use std::{env, path::Path, path::PathBuf};

use anyhow::{Result, bail};
use log::{info, warn};
use m3u_inspect::{Config, error_with_log, load_config, loader::load_playlist, report::Summary};

const DEFAULT_CONFIG_PATH: &str = "m3u-inspect.yml";

fn read_config() -> Result<Config> {
    match env::var("M3U_INSPECT_CONFIG") {
        Ok(path) => load_config(path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        Err(_) => Ok(Config::default()),
    }
}

async fn app_entry() -> Result<()> {
    let mut config = read_config()?;
    config.inputs.extend(env::args_os().skip(1).map(PathBuf::from));
    if config.inputs.is_empty() {
        bail!("No playlists given, pass paths as arguments or list them under `inputs`");
    }

    let options = config.parser_options();
    info!("Parsing {} playlists (strict: {})", config.inputs.len(), options.strict);

    let mut failed = 0;
    for input in config.inputs.iter() {
        let name = input.display().to_string();
        match load_playlist(input, options)
            .await
            .map_err(error_with_log!(&name))
        {
            Ok(playlist) => print!("{}", Summary(&name, &playlist)),
            Err(_) => failed += 1,
        }
    }

    if failed > 0 {
        warn!("{} of {} playlists failed", failed, config.inputs.len());
        bail!("{} playlists could not be parsed", failed);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(e) = app_entry().await {
        panic!("Fatal error: {}", e);
    }
}
