mod ledger_tests;
