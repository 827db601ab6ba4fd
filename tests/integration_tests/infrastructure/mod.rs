mod ibb_open_data_client_test;
