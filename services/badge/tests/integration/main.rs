mod broadcast_test;
mod helpers;
