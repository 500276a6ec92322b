//! Save states on disk, one file per slot next to the ROM
//! (`game.gb` -> `game.state0` .. `game.state9`).

use std::path::{Path, PathBuf};

use lantern_core::core::host::StateStore;

pub struct FileStateStore {
    base: PathBuf,
}

impl FileStateStore {
    pub fn new(rom_path: &Path) -> Self {
        Self {
            base: rom_path.to_path_buf(),
        }
    }

    fn slot_path(&self, slot: u8) -> PathBuf {
        self.base.with_extension(format!("state{slot}"))
    }
}

impl StateStore for FileStateStore {
    fn save(&mut self, slot: u8, data: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.slot_path(slot), data)
    }

    fn load(&mut self, slot: u8) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.slot_path(slot))
    }
}
