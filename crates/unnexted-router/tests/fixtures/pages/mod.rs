// page fixture: scanned by router_tests.rs, never compiled
