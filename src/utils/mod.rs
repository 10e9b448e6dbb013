pub mod audio_files;
