mod chat_ws_test;
