use std::path::PathBuf;

use fitview::{config::SessionConfig, FitKind, Session};

const USAGE: &str = "Usage: fitview [data.csv] [kind=linear|quadratic] [predict=<x>] \
                     [config=<toml>] [save | save=<path>] [plot=<svg>] [json]";

fn main() {
    let mut data_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut kind: Option<FitKind> = None;
    let mut predictions = Vec::new();
    let mut save = false;
    let mut save_path: Option<PathBuf> = None;
    let mut plot_path: Option<PathBuf> = None;
    let mut json = false;

    for arg in std::env::args().skip(1) {
        if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        } else if arg == "json" {
            json = true;
        } else if arg == "save" {
            save = true;
        } else if let Some(option) = arg.strip_prefix("kind=") {
            match option.parse() {
                Ok(k) => kind = Some(k),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        } else if let Some(option) = arg.strip_prefix("predict=") {
            predictions.push(option.to_string());
        } else if let Some(option) = arg.strip_prefix("config=") {
            config_path = Some(PathBuf::from(option));
        } else if let Some(option) = arg.strip_prefix("save=") {
            save_path = Some(PathBuf::from(option));
        } else if let Some(option) = arg.strip_prefix("plot=") {
            plot_path = Some(PathBuf::from(option));
        } else if data_path.is_none() && !arg.contains('=') {
            data_path = Some(PathBuf::from(arg));
        } else {
            eprintln!("Unrecognized argument: {arg}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    //
    // Settings come from the config file if given, then the command line overrides them.
    let mut config = match config_path {
        Some(path) => SessionConfig::load(&path).unwrap_or_else(|err| {
            eprintln!("Failed to load config {}: {err}", path.display());
            std::process::exit(1);
        }),
        None => SessionConfig::default(),
    };
    if let Some(kind) = kind {
        config.fit_kind = kind;
    }
    let data_path = data_path.unwrap_or_else(|| config.data_path.clone());

    let session: Session = Session::load_or_demo(&data_path, config);
    let model = session.model();
    let properties = model.properties(session.points().as_slice());

    if json {
        match serde_json::to_string_pretty(&properties) {
            Ok(s) => println!("{s}"),
            Err(err) => {
                eprintln!("Failed to serialize fit: {err}");
                std::process::exit(1);
            }
        }
    } else {
        println!("Regression {}", session.fit_kind().label());
        println!("{model}");
        println!("Points: {}", properties.data_points);
        println!("MSE: {:.4}", properties.mean_squared_error);
        println!("R²: {:.4}", properties.r_squared);

        let far = session.highlighted().filter(|(_, far)| *far).count();
        if far > 0 {
            println!("Far from curve: {far}");
        }
    }

    for input in &predictions {
        println!("{}", session.predict(input));
    }

    //
    // `save=<path>` wins over a bare `save`, which uses the configured path.
    let saved = match save_path {
        Some(path) => Some(session.save(&path)),
        None if save => Some(session.save_default()),
        None => None,
    };
    if let Some(Err(err)) = saved {
        eprintln!("{err}");
        std::process::exit(1);
    }

    if let Some(path) = plot_path {
        render(&session, &path);
    }
}

#[cfg(feature = "plotting")]
fn render(session: &Session, path: &std::path::Path) {
    if let Err(err) = fitview::plotting::render_svg(session, path) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "plotting"))]
fn render(_: &Session, _: &std::path::Path) {
    eprintln!("fitview was built without the `plotting` feature; plot= is unavailable");
    std::process::exit(1);
}
