use std::path::PathBuf;

use clap::Parser;
use lantern_core::shell::session::Session;
use lantern_cores::registry;

mod audio;
mod browser;
mod config;
mod font;
mod input;
mod state_store;
mod video;

/// Handheld console emulator shell.
#[derive(Parser)]
#[command(name = "lantern", version)]
struct Args {
    /// Console core to run (e.g. "test-pattern").
    core: String,

    /// ROM file. When omitted, browse the ROM directory instead.
    rom: Option<PathBuf>,

    /// Window scale factor.
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Directory to browse for ROMs (overrides the configured one).
    #[arg(long)]
    rom_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let entry = registry::find(&args.core).unwrap_or_else(|| {
        let names: Vec<_> = registry::all().iter().map(|e| e.name).collect();
        eprintln!("Unknown core: {}", args.core);
        eprintln!("Available: {}", names.join(", "));
        std::process::exit(1);
    });

    let mut cfg = config::load();
    if let Some(dir) = &args.rom_dir {
        cfg.rom_dir = Some(dir.clone());
    }

    let rom_path = match args.rom {
        Some(path) => path,
        None => {
            let dir = cfg.rom_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            browser::pick_rom(&dir, entry.extensions).unwrap_or_else(|e| {
                eprintln!("ROM selection failed: {e}");
                std::process::exit(1);
            })
        }
    };

    let rom = std::fs::read(&rom_path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", rom_path.display());
        std::process::exit(1);
    });

    let mut console = (entry.create)();
    if let Err(e) = console.load_rom(&rom) {
        eprintln!("Failed to load {}: {e}", rom_path.display());
        std::process::exit(1);
    }
    console.reset(true);

    let sdl = sdl2::init().expect("Failed to initialize SDL");
    let sdl_video = sdl.video().expect("Failed to initialize SDL video");
    let sdl_audio = sdl.audio().expect("Failed to initialize SDL audio");

    let title = format!("lantern - {}", entry.name);
    let display = video::SdlDisplay::new(&sdl_video, &title, args.scale.max(1));
    let audio_out = audio::SdlAudioOut::new(&sdl_audio, console.sample_rate());
    let input = input::SdlInput::new(&sdl);
    let store = state_store::FileStateStore::new(&rom_path);

    let mut session = Session::new(
        console,
        Box::new(display),
        Box::new(audio_out),
        Box::new(input),
        Box::new(store),
        cfg.settings(),
    );
    session.run();

    cfg.absorb(session.settings());
    if let Err(e) = config::save(&cfg) {
        eprintln!("Warning: failed to save config: {e}");
    }
}
