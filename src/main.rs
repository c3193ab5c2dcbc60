use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use dicom_mpr::{Event, Session, SortBy, ViewImage, ViewerConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Plane {
    Coronal,
    Sagittal,
}

/// Render the axial and one secondary view of a DICOM series to PNG.
#[derive(Parser, Debug)]
#[command(author, about, version, long_about)]
struct Args {
    /// folder containing the .dcm files of one series
    directory: PathBuf,

    /// folder the rendered views are written to
    #[arg(short, long, default_value = "./")]
    output: PathBuf,

    /// secondary plane shown next to the axial view
    #[arg(short, long, value_enum, default_value_t = Plane::Coronal)]
    plane: Plane,
}

fn save_view(view: &ViewImage, directory: &Path, name: &str) -> Result<(), String> {
    let image = view
        .to_image()
        .ok_or_else(|| format!("could not convert {} to an image", view.title))?;
    let path = directory.join(name);
    image
        .save(&path)
        .map_err(|e| format!("could not write {}: {e}", path.display()))?;
    log::info!("Wrote {} to {}", view.title, path.display());
    Ok(())
}

fn run(args: &Args) -> Result<(), String> {
    let mut session = Session::new(ViewerConfig::default());
    session
        .load_directory(&args.directory, SortBy::InstanceNumber)
        .map_err(|e| format!("failed to load {}: {e}", args.directory.display()))?;

    if matches!(args.plane, Plane::Sagittal) {
        session.dispatch(Event::PlaneToggled).map_err(|e| e.to_string())?;
    }

    if let Some(header) = session.header() {
        println!("{header}");
    }
    let output = session
        .output()
        .ok_or_else(|| "no series loaded".to_string())?;
    println!("{}", output.window_label);

    fs::create_dir_all(&args.output).map_err(|e| e.to_string())?;
    save_view(&output.axial, &args.output, "axial.png")?;
    let secondary_name = match args.plane {
        Plane::Coronal => "coronal.png",
        Plane::Sagittal => "sagittal.png",
    };
    save_view(&output.secondary, &args.output, secondary_name)?;
    println!("{} | {}", output.axial.title, output.secondary.title);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error! {message}");
            ExitCode::FAILURE
        }
    }
}
