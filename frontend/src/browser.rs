//! ROM browsing: list the files in a directory that a core can load and
//! let the user pick one from the terminal.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// List regular files under `dir` whose extension matches one of
/// `extensions` (case-insensitive), sorted by file name.
pub fn list_roms(dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut roms = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)));
        if matches {
            roms.push(path);
        }
    }
    roms.sort();
    Ok(roms)
}

/// Print the ROMs under `dir` and read a 1-based choice from stdin.
pub fn pick_rom(dir: &Path, extensions: &[&str]) -> io::Result<PathBuf> {
    let mut roms = list_roms(dir, extensions)?;
    if roms.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "no ROMs matching {:?} under {}",
                extensions,
                dir.display()
            ),
        ));
    }

    println!("ROMs in {}:", dir.display());
    for (i, rom) in roms.iter().enumerate() {
        let name = rom.file_name().and_then(|n| n.to_str()).unwrap_or("?");
        println!("  {}. {name}", i + 1);
    }
    print!("Select a ROM [1-{}]: ", roms.len());
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let choice: usize = line
        .trim()
        .parse()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "not a number"))?;
    if choice == 0 || choice > roms.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "selection out of range",
        ));
    }
    Ok(roms.swap_remove(choice - 1))
}
