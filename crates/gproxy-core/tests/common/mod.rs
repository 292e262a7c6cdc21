pub mod file_host;
