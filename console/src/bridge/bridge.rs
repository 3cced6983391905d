use crate::bridge::model::{BridgeModel, QueryRequest};
use crate::workflow::runner::Runner;
use log::{error, info};
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use vesselcore::analysis::QueryReport;
use warp::{Filter, Rejection, Reply};

/// Bridge that serves structured query results to a presentation layer.
pub struct QueryBridge {
    state: Arc<RwLock<BridgeModel>>,
    runner: Arc<Runner>,
}

fn record(state: &RwLock<BridgeModel>, report: &QueryReport) {
    if let Ok(mut guard) = state.write() {
        guard.last_report = Some(report.clone());
        guard.queries_served += 1;
    }
}

async fn answer_query(
    request: QueryRequest,
    state: Arc<RwLock<BridgeModel>>,
    runner: Arc<Runner>,
) -> Result<impl Reply, Rejection> {
    let report = runner.execute(&request.text);
    record(&state, &report);
    Ok(warp::reply::json(&report))
}

impl QueryBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BridgeModel::default())),
            runner,
        }
    }

    pub fn routes(&self) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let vessels_route = warp::path("vessels")
            .and(warp::get())
            .and(runner_filter.clone())
            .map(|runner: Arc<Runner>| warp::reply::json(&runner.vessel_names()));

        let metrics_route = warp::path("metrics")
            .and(warp::get())
            .and(runner_filter.clone())
            .map(|runner: Arc<Runner>| warp::reply::json(&runner.metrics()));

        let latest_route = warp::path("latest")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<BridgeModel>>| {
                let model = state.read().map(|guard| guard.clone()).unwrap_or_default();
                warp::reply::json(&model)
            });

        let query_route = warp::path("query")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(answer_query);

        vessels_route.or(metrics_route).or(latest_route).or(query_route)
    }

    /// Serves the routes on a dedicated thread with its own runtime.
    pub fn serve(&self, addr: SocketAddr) {
        let routes = self.routes();
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            info!("query bridge listening on http://{}", addr);
            runtime.block_on(async move {
                warp::serve(routes).run(addr).await;
            });
        });
    }

    pub fn publish(&self, report: &QueryReport) {
        record(&self.state, report);
    }

    pub fn publish_status(&self, message: &str) {
        println!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> BridgeModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::ConsoleConfig;

    fn bridge() -> QueryBridge {
        let runner = Arc::new(Runner::new(&ConsoleConfig::default()).unwrap());
        QueryBridge::new(runner)
    }

    #[test]
    fn bridge_publish_updates_state() {
        let bridge = bridge();
        let report = bridge.runner.execute("Where is Rainbow?");
        bridge.publish(&report);
        let snapshot = bridge.snapshot();
        assert_eq!(snapshot.queries_served, 1);
        assert_eq!(snapshot.last_report, Some(report));
    }

    #[tokio::test]
    async fn query_route_returns_report_json() {
        let bridge = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/query")
            .json(&QueryRequest {
                text: "Predict where RAINBOW will be after 30 minutes".into(),
            })
            .reply(&bridge.routes())
            .await;
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["parsed"]["intent"], "predict");
        assert_eq!(body["outcome"]["kind"], "prediction");
        assert_eq!(body["outcome"]["horizon_minutes"], 30);
        assert_eq!(bridge.snapshot().queries_served, 1);
    }

    #[tokio::test]
    async fn vessels_route_lists_registry() {
        let bridge = bridge();
        let response = warp::test::request()
            .method("GET")
            .path("/vessels")
            .reply(&bridge.routes())
            .await;
        let names: Vec<String> = serde_json::from_slice(response.body()).unwrap();
        assert!(names.contains(&"SEA WITCH".to_string()));
    }

    #[tokio::test]
    async fn latest_route_returns_last_answer() {
        let bridge = bridge();
        let routes = bridge.routes();
        let empty = warp::test::request().method("GET").path("/latest").reply(&routes).await;
        let model: BridgeModel = serde_json::from_slice(empty.body()).unwrap();
        assert_eq!(model.queries_served, 0);
        assert!(model.last_report.is_none());

        warp::test::request()
            .method("POST")
            .path("/query")
            .json(&QueryRequest {
                text: "Where is Titan?".into(),
            })
            .reply(&routes)
            .await;
        let response = warp::test::request().method("GET").path("/latest").reply(&routes).await;
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["queries_served"], 1);
        assert_eq!(body["last_report"]["outcome"]["kind"], "position");
        assert_eq!(body["last_report"]["outcome"]["vessel_name"], "TITAN");
    }
}
