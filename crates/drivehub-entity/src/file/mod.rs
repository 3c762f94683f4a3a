//! File domain entities.

pub mod kind;
pub mod model;

pub use kind::{
    DRIVE_ICON, FILE_ICON, FOLDER_ICON, FileCategory, PROVIDER_ICON, file_type_of, icon_for_type,
};
pub use model::FileRecord;
