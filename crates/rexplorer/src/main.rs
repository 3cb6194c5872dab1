mod app;
mod cli;
mod keymap;
mod ui;

use app::AppState;
use cli::CliCommand;
use gpui::*;
use gpui_component::Root;
use gpui_component::theme::{Theme, ThemeMode};
use log::{error, info};
use rexplorer_core::{AppConfig, AppConfigStore, Explorer, URL_ENV_VAR};
use rexplorer_driver_redis::RedisDriver;
use ui::workspace::Workspace;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let uri = match cli::parse(&args) {
        Ok(CliCommand::Run { uri }) => uri,
        Ok(CliCommand::Help) => {
            println!("{}", cli::usage());
            return;
        }
        Ok(CliCommand::Version) => {
            println!("{}", cli::version());
            return;
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, cli::usage());
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = match load_config(uri.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let target = config.connection.display_uri();
    info!("Connecting to {}", target);

    let store = match RedisDriver::new().connect(&config.connection) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to connect to {}: {}", target, e);
            eprintln!("Failed to connect to {}: {}", target, e);
            std::process::exit(1);
        }
    };

    let explorer = Explorer::new(store.into_store_arc()).with_delimiter(config.delimiter);
    run_gui(explorer, target, config.font_size);
}

fn load_config(cli_uri: Option<&str>) -> Result<AppConfig, rexplorer_core::ExplorerError> {
    let store = AppConfigStore::new()?;
    let mut config = store.load_or_init()?;

    let env_uri = std::env::var(URL_ENV_VAR).ok();
    config.apply_uri_overrides([cli_uri, env_uri.as_deref()])?;

    Ok(config)
}

fn run_gui(explorer: Explorer, target: String, font_size: f32) {
    Application::new().run(move |cx: &mut App| {
        gpui_component::init(cx);
        Theme::change(ThemeMode::Dark, None, cx);
        keymap::init(cx);

        let app_state = cx.new(|_cx| AppState::new(explorer));

        cx.open_window(
            WindowOptions {
                app_id: Some("rexplorer".into()),
                titlebar: Some(TitlebarOptions {
                    title: Some(format!("rexplorer - {}", target).into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            |window, cx| {
                let workspace =
                    cx.new(|cx| Workspace::new(app_state.clone(), font_size, window, cx));
                cx.new(|cx| Root::new(workspace, window, cx))
            },
        )
        .expect("Failed to open main window");

        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                info!("Last window closed, quitting");
                cx.quit();
            }
        })
        .detach();
    });
}
