mod dashboard_flow;
