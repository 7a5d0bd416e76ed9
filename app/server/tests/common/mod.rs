//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for HTTP integration tests.

use app_lib::{sales_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

/// Three order lines in the full Superstore layout: two lines of order A by
/// customer X, one line of order B by customer Y.
pub const SAMPLE_CSV: &str = "\
Row ID,Order ID,Order Date,Ship Date,Ship Mode,Customer ID,Customer Name,Segment,Country,City,State,Postal Code,Region,Product ID,Category,Sub-Category,Product Name,Sales,Quantity,Discount,Profit
1,A,1/5/2024,1/8/2024,Standard Class,X,Xavier,Consumer,United States,Columbus,Ohio,43229,East,FUR-1,Furniture,Tables,\"Desk, oak\",100,1,0,10
2,A,1/5/2024,1/8/2024,Standard Class,X,Xavier,Consumer,United States,Columbus,Ohio,43229,East,FUR-2,Furniture,Chairs,Chair,50,2,0.2,-5
3,B,2/10/2024,2/12/2024,First Class,Y,Yasmine,Corporate,United States,Seattle,Washington,98103,West,OFF-1,Office,Paper,Paper,200,1,0,40
";

/// Response pieces a test cares about.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes).expect("response body is JSON")
    }
}

/// Test harness holding a router over the sample dataset.
pub struct TestHarness {
    pub router: Router,
}

impl TestHarness {
    /// Harness over `SAMPLE_CSV`, loaded through the real CSV loader.
    pub fn new() -> Self {
        Self::from_csv(SAMPLE_CSV)
    }

    pub fn from_csv(csv: &str) -> Self {
        let dataset = dataset::load_bytes(csv.as_bytes()).expect("fixture loads");
        TestHarness {
            router: sales_router(AppState::new(dataset), None),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects")
            .to_vec();

        TestResponse {
            status,
            headers,
            bytes,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds");
        self.send(request).await
    }
}
