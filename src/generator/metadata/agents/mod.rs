pub mod metadata_editor;
