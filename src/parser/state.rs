//! Open-block tracking and staged multi-line objects.

use crate::types::{CameraRail, Submesh};

use super::keyword::Keyword;

/// Objects released by closing a block, ready to be committed.
#[derive(Debug, Default)]
pub struct Flushed {
    pub submesh: Option<Submesh>,
    pub camera_rail: Option<CameraRail>,
}

#[derive(Debug, Default)]
pub struct BlockState {
    current: Option<Keyword>,
    submesh: Option<Submesh>,
    camera_rail: Option<CameraRail>,
}

impl BlockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open block, if any.
    pub fn current(&self) -> Option<Keyword> {
        self.current
    }

    /// Close the open block and release everything staged.
    pub fn close(&mut self) -> Flushed {
        self.current = None;
        Flushed {
            submesh: self.submesh.take(),
            camera_rail: self.camera_rail.take(),
        }
    }

    /// Open `block`. The staged submesh survives only into `cab` and `texcoords`.
    pub fn open(&mut self, block: Keyword) -> Flushed {
        let flushed = if matches!(block, Keyword::Cab | Keyword::Texcoords) {
            self.current = None;
            Flushed {
                submesh: None,
                camera_rail: self.camera_rail.take(),
            }
        } else {
            self.close()
        };
        if block == Keyword::Camerarail {
            self.camera_rail = Some(CameraRail::default());
        }
        self.current = Some(block);
        flushed
    }

    /// `submesh`: close everything, then stage a fresh submesh.
    pub fn begin_submesh(&mut self) -> Flushed {
        let flushed = self.close();
        self.submesh = Some(Submesh::default());
        flushed
    }

    /// Like `close`, but for `minimass`, which only ever takes one line.
    pub fn close_if(&mut self, block: Keyword) -> Option<Flushed> {
        (self.current == Some(block)).then(|| self.close())
    }

    pub fn submesh_mut(&mut self) -> Option<&mut Submesh> {
        self.submesh.as_mut()
    }

    pub fn camera_rail_mut(&mut self) -> Option<&mut CameraRail> {
        self.camera_rail.as_mut()
    }
}
