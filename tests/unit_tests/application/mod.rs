mod similarity_engine_test;
