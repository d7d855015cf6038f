pub mod feature_file;
