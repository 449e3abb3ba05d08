mod exchange_ctx_tests;
