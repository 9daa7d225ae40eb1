pub mod ping_server;
