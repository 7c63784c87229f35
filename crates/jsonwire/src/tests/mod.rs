mod codec_entry_points;
mod reader_numbers;
mod reader_temporal;
mod reader_tokens;
mod scenarios;
mod utils;
mod writer_output;
