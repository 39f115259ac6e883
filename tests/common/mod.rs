use actix_web::{web, App};

use loadboard_api::config::FeeSchedule;
use loadboard_api::routes;
use loadboard_api::services::fee_service::FeeCalculator;

pub const TIER_HEADER: &str = "X-Membership-Tier";

pub struct TestApp {
    pub calculator: FeeCalculator,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            calculator: FeeCalculator::default(),
        }
    }

    #[allow(dead_code)]
    pub fn with_schedule(schedule: FeeSchedule) -> Self {
        Self {
            calculator: FeeCalculator::new(schedule).expect("valid test schedule"),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.calculator.clone()))
            .configure(routes::configure)
    }
}
