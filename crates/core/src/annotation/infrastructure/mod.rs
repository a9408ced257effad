pub mod json_annotation_reader;
