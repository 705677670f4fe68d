//! Descriptive and miscellaneous per-module settings.

use serde::Serialize;

/// `author`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub author_type: String,
    pub forum_account_id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `fileinfo`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fileinfo {
    pub unique_id: String,
    pub category_id: Option<i32>,
    pub file_version: Option<i32>,
}

/// `fileformatversion`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileFormatVersion {
    pub version: i32,
}

impl FileFormatVersion {
    /// First version that addresses nodes by name only.
    pub const NAMED_NODES: i32 = 450;
}

/// `guid`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guid {
    pub guid: String,
}

/// `guisettings`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuiSettings {
    pub key: String,
    pub value: String,
}

/// `help`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Help {
    pub material: String,
}

/// `set_collision_range`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionRange {
    pub node_collision_range: f32,
}

/// `set_skeleton_settings`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonSettings {
    pub visibility_range_meters: f32,
    pub beam_thickness_meters: f32,
}

impl SkeletonSettings {
    pub const DEFAULT_VISIBILITY_RANGE: f32 = 150.0;
    pub const DEFAULT_BEAM_THICKNESS: f32 = 0.01;
}

impl Default for SkeletonSettings {
    fn default() -> Self {
        Self {
            visibility_range_meters: Self::DEFAULT_VISIBILITY_RANGE,
            beam_thickness_meters: Self::DEFAULT_BEAM_THICKNESS,
        }
    }
}
