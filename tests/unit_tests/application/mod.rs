mod prompt_composer_test;
mod response_parser_test;
mod wav_encoder_test;
