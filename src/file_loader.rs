use crate::device::Screen;
use crate::encoding::from_disk;
use crate::error::{Error, Result};
use crate::state::memory::{Memory, MEMORY_SIZE};
use byteorder::{NativeEndian, ReadBytesExt};
use log::{info, trace};
use std::io::{BufReader, ErrorKind, Read};
use std::{fs, path::Path};

/// An object file: the address to load at, then the words to put there.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub origin: u16,
    pub words: Vec<u16>,
}

impl Image {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Image> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let file = fs::File::open(path).map_err(|source| Error::ImageLoad {
            path: display.clone(),
            source,
        })?;

        Image::read(BufReader::new(file)).map_err(|error| match error {
            Error::Io(ref source) if source.kind() == ErrorKind::UnexpectedEof => {
                Error::EmptyImage { path: display }
            }
            Error::Io(source) => Error::ImageLoad {
                path: display,
                source,
            },
            other => other,
        })
    }

    /// Reads a big-endian origin followed by big-endian words. Words that would land past the
    /// top of memory and a trailing odd byte are dropped.
    pub fn read<R: Read>(mut reader: R) -> Result<Image> {
        let origin = from_disk(reader.read_u16::<NativeEndian>()?);
        let max_words = MEMORY_SIZE - usize::from(origin);

        let mut words = Vec::new();
        while words.len() < max_words {
            match reader.read_u16::<NativeEndian>() {
                Ok(word) => words.push(from_disk(word)),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Image { origin, words })
    }

    pub fn load_into(&self, memory: &mut Memory) {
        info!(
            "loading {} words at {:#06x}",
            self.words.len(),
            self.origin
        );

        let mut address = self.origin;
        for word in &self.words {
            trace!("memory[{:#06x}] = {:#06x}", address, word);
            memory.write(address, *word);
            address = address.wrapping_add(1);
        }
    }

    /// Writes one `Memory[0x....] = 0x....` line per loaded word.
    pub fn dump(&self, screen: &mut dyn Screen) -> Result<()> {
        let mut address = self.origin;
        for word in &self.words {
            screen.write_str(&format!("Memory[0x{:04X}] = 0x{:04X}\n", address, word))?;
            address = address.wrapping_add(1);
        }

        screen.flush()?;
        Ok(())
    }
}

pub fn load_file<P: AsRef<Path>>(path: P, memory: &mut Memory) -> Result<Image> {
    let image = Image::open(path)?;
    image.load_into(memory);
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{BufferedKeyboard, BufferedScreen};
    use std::io::{Cursor, Write};

    fn memory() -> Memory {
        Memory::new(Box::new(BufferedKeyboard::default()))
    }

    #[test]
    fn read_origin_and_words() {
        let bytes = [0x30, 0x00, 0x52, 0x20, 0xf0, 0x25];

        let image = Image::read(Cursor::new(&bytes[..])).unwrap();

        assert_eq!(
            image,
            Image {
                origin: 0x3000,
                words: vec![0x5220, 0xf025],
            }
        );
    }

    #[test]
    fn read_ignores_trailing_byte() {
        let bytes = [0x30, 0x00, 0x12, 0x34, 0x56];

        let image = Image::read(Cursor::new(&bytes[..])).unwrap();

        assert_eq!(image.words, vec![0x1234]);
    }

    #[test]
    fn read_stops_at_top_of_memory() {
        let bytes = [0xff, 0xfe, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03];

        let image = Image::read(Cursor::new(&bytes[..])).unwrap();

        assert_eq!(image.words, vec![1, 2]);
    }

    #[test]
    fn read_without_origin() {
        let error = Image::read(Cursor::new(&[0x30][..])).unwrap_err();

        assert!(matches!(error, Error::Io(ref e) if e.kind() == ErrorKind::UnexpectedEof));
    }

    #[test]
    fn load_into_memory() {
        let mut memory = memory();
        let image = Image {
            origin: 0x4000,
            words: vec![1, 2, 3],
        };

        image.load_into(&mut memory);

        assert_eq!(memory.peek(0x3fff), 0);
        assert_eq!(memory.peek(0x4000), 1);
        assert_eq!(memory.peek(0x4002), 3);
        assert_eq!(memory.peek(0x4003), 0);
    }

    #[test]
    fn dump_lists_every_word() {
        let image = Image {
            origin: 0x3000,
            words: vec![0xe002, 0xf025],
        };
        let screen = BufferedScreen::default();

        image.dump(&mut screen.clone()).unwrap();

        assert_eq!(
            screen.text(),
            "Memory[0x3000] = 0xE002\nMemory[0x3001] = 0xF025\n"
        );
    }

    #[test]
    fn load_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x30, 0x00, 0xe0, 0x02, 0xf0, 0x22]).unwrap();
        let mut memory = memory();

        load_file(file.path(), &mut memory).unwrap();

        assert_eq!(memory.peek(0x3000), 0xe002);
        assert_eq!(memory.peek(0x3001), 0xf022);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.obj");

        let error = load_file(&path, &mut memory()).unwrap_err();

        match error {
            Error::ImageLoad { path: p, source } => {
                assert!(p.ends_with("missing.obj"));
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let error = load_file(file.path(), &mut memory()).unwrap_err();

        assert!(matches!(error, Error::EmptyImage { .. }));
    }
}
