mod cached_tests;
