mod alerting;
