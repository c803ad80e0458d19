// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The PTY collaborator (§4.3): spawn a child on a pseudo-terminal, poll for
//! bytes, write bytes back, report window-size changes.
//!
//! `poll` is non-blocking from the caller's point of view: a background thread
//! does the blocking `read()` loop against the master side and forwards chunks
//! through a channel; `poll` drains whatever is currently buffered with
//! `try_recv`, mirroring the original's "read until EAGAIN" loop without pulling
//! in an async runtime.

use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};

use crate::error::TermError;
use crate::renderer::RendererCollaborator;
use crate::terminal::Terminal;

/// Matches the original source's per-read chunk size.
pub const READ_BUFFER_SIZE: usize = 255;

/// `Spawn`/`Poll`/`Send`/`SetWindowSize` from §4.3, as a trait so callers can
/// substitute a fake PTY in tests.
pub trait PtyCollaborator {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TermError>;
    fn set_window_size(&mut self, cols: u32, rows: u32) -> Result<(), TermError>;
    fn poll(
        &mut self,
        term: &mut Terminal,
        renderer: &mut dyn RendererCollaborator,
    ) -> Result<(), TermError>;
}

/// A `PtyCollaborator` backed by `portable-pty`, replacing the original's direct
/// `openpty`/`fork`/`execve`/`TIOCSCTTY`/`TIOCSWINSZ` syscalls with the
/// cross-platform equivalents `portable-pty` already wraps.
pub struct PosixPty {
    writer: Box<dyn Write + Send>,
    master: Box<dyn MasterPty + Send>,
    child: Box<dyn Child + Send + Sync>,
    reader_rx: Receiver<Vec<u8>>,
    _reader_thread: JoinHandle<()>,
}

impl PosixPty {
    /// Opens a pty pair and execs `exe` with `args` on the slave side, sized to
    /// `cols` x `rows`. Failure surfaces as `TermError::PtyError`.
    pub fn spawn(exe: &str, args: &[String], cols: u16, rows: u16) -> Result<Self, TermError> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize { rows, cols, pixel_width: 0, pixel_height: 0 })
            .map_err(|e| TermError::PtyError { detail: e.to_string() })?;

        let mut cmd = CommandBuilder::new(exe);
        cmd.args(args);

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| TermError::PtyError { detail: e.to_string() })?;
        drop(pair.slave);

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| TermError::PtyError { detail: e.to_string() })?;
        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| TermError::PtyError { detail: e.to_string() })?;

        let (tx, rx) = mpsc::channel();
        let reader_thread = std::thread::spawn(move || {
            let mut buf = [0u8; READ_BUFFER_SIZE];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            writer,
            master: pair.master,
            child,
            reader_rx: rx,
            _reader_thread: reader_thread,
        })
    }

    /// True once the child has exited.
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }
}

impl PtyCollaborator for PosixPty {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TermError> {
        self.writer
            .write_all(bytes)
            .map_err(|e| TermError::PtyError { detail: e.to_string() })
    }

    fn set_window_size(&mut self, cols: u32, rows: u32) -> Result<(), TermError> {
        self.master
            .resize(PtySize { rows: rows as u16, cols: cols as u16, pixel_width: 0, pixel_height: 0 })
            .map_err(|e| TermError::PtyError { detail: e.to_string() })
    }

    /// Drains whatever the reader thread has buffered, feeding each chunk
    /// through `Terminal::write_bytes` in arrival order, until nothing remains.
    fn poll(
        &mut self,
        term: &mut Terminal,
        renderer: &mut dyn RendererCollaborator,
    ) -> Result<(), TermError> {
        loop {
            match self.reader_rx.try_recv() {
                Ok(chunk) => term.write_bytes(&chunk, renderer),
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_is_pty_collaborator<T: PtyCollaborator>() {}

    #[test]
    fn posix_pty_implements_the_collaborator_trait() {
        assert_is_pty_collaborator::<PosixPty>();
    }
}
