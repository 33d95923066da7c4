mod automation_test;
