// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use tracing::debug;

/// The window of list rows currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self { offset: 0, height }
    }

    /// Last offset that still fills the screen for `content_len` rows.
    fn max_offset(&self, content_len: usize) -> usize {
        content_len.saturating_sub(self.height)
    }

    pub fn scroll_down(&mut self, rows: usize, content_len: usize) {
        self.offset = (self.offset + rows).min(self.max_offset(content_len));
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self, content_len: usize) {
        self.offset = self.max_offset(content_len);
    }

    /// Pull the offset back inside the content after it shrank.
    pub fn clamp(&mut self, content_len: usize) {
        self.offset = self.offset.min(self.max_offset(content_len));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorOptions {
    /// Rows added around the viewport before testing intersection.
    pub root_margin: usize,
    /// Fraction of the sentinel that must be inside, in `(0.0, 1.0]`.
    pub threshold: f32,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            root_margin: 1,
            threshold: 1.0,
        }
    }
}

/// Rows `[row, row + height)` occupied by the sentinel on one mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    pub mount: u64,
    pub row: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible {
    pub mount: u64,
}

/// Watches one sentinel and reports each time it comes into view.
#[derive(Debug)]
pub struct VisibilitySensor {
    options: SensorOptions,
    mount: Option<u64>,
    intersecting: bool,
}

impl VisibilitySensor {
    pub fn new(options: SensorOptions) -> Self {
        Self {
            options,
            mount: None,
            intersecting: false,
        }
    }

    /// Start watching `mount`. Rebinding the mount already watched changes nothing.
    pub fn bind(&mut self, mount: u64) {
        if self.mount == Some(mount) {
            return;
        }
        debug!("VisibilitySensor::bind | mount: {}", mount);
        self.mount = Some(mount);
        self.intersecting = false;
    }

    pub fn unbind(&mut self) {
        if self.mount.take().is_some() {
            debug!("VisibilitySensor::unbind");
        }
        self.intersecting = false;
    }

    pub fn bound_mount(&self) -> Option<u64> {
        self.mount
    }

    pub fn intersection_ratio(&self, viewport: Viewport, sentinel: Sentinel) -> f32 {
        if sentinel.height == 0 {
            return 0.0;
        }
        let root_top = viewport.offset.saturating_sub(self.options.root_margin);
        let root_bottom = viewport.offset + viewport.height + self.options.root_margin;
        let top = sentinel.row.max(root_top);
        let bottom = (sentinel.row + sentinel.height).min(root_bottom);
        bottom.saturating_sub(top) as f32 / sentinel.height as f32
    }

    /// Emits once per transition from hidden to visible for the bound mount.
    pub fn observe(&mut self, viewport: Viewport, sentinel: Sentinel) -> Option<Visible> {
        if self.mount != Some(sentinel.mount) {
            return None;
        }

        let ratio = self.intersection_ratio(viewport, sentinel);
        let now_intersecting = ratio > 0.0 && ratio >= self.options.threshold;
        let entered = now_intersecting && !self.intersecting;
        self.intersecting = now_intersecting;

        if entered {
            debug!(
                "VisibilitySensor::observe | sentinel row {} visible at offset {}",
                sentinel.row, viewport.offset
            );
            Some(Visible {
                mount: sentinel.mount,
            })
        } else {
            None
        }
    }
}
