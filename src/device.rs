//! The host side of the machine: where keystrokes come from and where characters go.
//!
//! [`Keyboard`] and [`Screen`] are the only ways the machine touches the outside world. The
//! terminal implementations ([`StdinKeyboard`], [`StdoutScreen`]) are used by the binary; the
//! buffered ones ([`BufferedKeyboard`], [`BufferedScreen`]) share their buffers so a caller can
//! feed input and inspect output while the machine owns the device.

use nix::sys::select::{select, FdSet};
use nix::sys::time::{TimeVal, TimeValLike};
use nix::unistd::read;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

pub trait Keyboard {
    /// Takes a pending character if one arrives within a short, bounded wait.
    fn poll(&mut self) -> Option<u8>;

    /// Blocks until a character is available.
    fn read_char(&mut self) -> io::Result<u8>;
}

pub trait Screen {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        for byte in s.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

/// How long a keyboard status read waits for a key before reporting "no input".
const KEY_POLL_TIMEOUT_MS: i64 = 1;

const STDIN_FILENO: i32 = 0;

#[derive(Debug, Default)]
pub struct StdinKeyboard;

impl Keyboard for StdinKeyboard {
    fn poll(&mut self) -> Option<u8> {
        if check_key() {
            self.read_char().ok()
        } else {
            None
        }
    }

    // Reads straight from the descriptor: a buffered reader could hold bytes that `select` no
    // longer reports as pending.
    fn read_char(&mut self) -> io::Result<u8> {
        let mut buffer = [0; 1];
        match read(STDIN_FILENO, &mut buffer) {
            Ok(0) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of standard input",
            )),
            Ok(_) => Ok(buffer[0]),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}

fn check_key() -> bool {
    let mut readfds = FdSet::new();
    readfds.insert(STDIN_FILENO);

    let mut timeout = TimeVal::milliseconds(KEY_POLL_TIMEOUT_MS);
    match select(None, &mut readfds, None, None, &mut timeout) {
        Ok(value) => value == 1,
        Err(_) => false,
    }
}

#[derive(Debug, Default)]
pub struct StdoutScreen;

impl Screen for StdoutScreen {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        io::stdout().write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Keyboard that takes its input from a shared buffer.
#[derive(Debug, Default, Clone)]
pub struct BufferedKeyboard {
    buffer: Rc<RefCell<VecDeque<u8>>>,
}

impl BufferedKeyboard {
    pub fn new(input: &[u8]) -> Self {
        let keyboard = Self::default();
        keyboard.push(input);
        keyboard
    }

    /// Queues more input. Clones of this keyboard see it too.
    pub fn push(&self, input: &[u8]) {
        self.buffer.borrow_mut().extend(input.iter().copied());
    }

    pub fn pending(&self) -> usize {
        self.buffer.borrow().len()
    }
}

impl Keyboard for BufferedKeyboard {
    fn poll(&mut self) -> Option<u8> {
        self.buffer.borrow_mut().pop_front()
    }

    fn read_char(&mut self) -> io::Result<u8> {
        self.buffer.borrow_mut().pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "keyboard input exhausted")
        })
    }
}

/// Screen that records everything written (flushed or not) in a shared buffer.
#[derive(Debug, Default, Clone)]
pub struct BufferedScreen {
    buffer: Rc<RefCell<Vec<u8>>>,
    flushes: Rc<RefCell<usize>>,
}

impl BufferedScreen {
    pub fn contents(&self) -> Vec<u8> {
        self.buffer.borrow().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.borrow()
    }
}

impl Screen for BufferedScreen {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.buffer.borrow_mut().push(byte);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.borrow_mut() += 1;
        Ok(())
    }
}
