mod key_ring_tests;
