pub mod audio;
pub mod city_data;
pub mod inference;
pub mod llm;
pub mod location;
pub mod models;
pub mod nlp;
pub mod observability;
pub mod speech;
pub mod storage;
