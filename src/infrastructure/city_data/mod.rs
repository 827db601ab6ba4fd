mod ibb_open_data_client;

pub use ibb_open_data_client::{
    DEFAULT_CITY_DATA_TIMEOUT, DEFAULT_CITY_DATA_URL, IbbOpenDataClient, parse_city_points,
};
