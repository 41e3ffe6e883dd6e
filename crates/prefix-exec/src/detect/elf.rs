//! Native executable detection

use log::trace;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Leading bytes of an ELF image
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// True iff the first four bytes of `path` are the ELF magic.
///
/// Missing files, permission errors and short files all yield `false`.
pub fn is_native_executable(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let mut magic = [0u8; ELF_MAGIC.len()];

    let result = File::open(path).and_then(|mut file| file.read_exact(&mut magic));
    match result {
        Ok(()) => magic == ELF_MAGIC,
        Err(e) => {
            trace!("format probe {}: {}", path.display(), e);
            false
        }
    }
}
