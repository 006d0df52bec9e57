//! Integration tests for the braille-reader binary.

#[path = "integration/helpers.rs"]
mod helpers;

#[path = "integration/cli_test.rs"]
mod cli_test;
#[path = "integration/config_test.rs"]
mod config_test;
#[path = "integration/ocr_test.rs"]
mod ocr_test;
#[path = "integration/playback_test.rs"]
mod playback_test;
