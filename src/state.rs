use crate::config::SiteConfig;
use crate::gate::RouteTable;
use crate::services::booking::AppointmentSubmitter;
use crate::services::calendar::CalendarProvider;
use crate::services::chatbot::ChatbotVisibility;

pub struct AppState {
    pub config: SiteConfig,
    pub routes: RouteTable,
    pub calendar: Box<dyn CalendarProvider>,
    pub submitter: AppointmentSubmitter,
    pub chatbot: ChatbotVisibility,
}

impl AppState {
    pub fn new(config: SiteConfig, calendar: Box<dyn CalendarProvider>) -> Self {
        let routes = RouteTable::from_config(&config);
        Self {
            config,
            routes,
            calendar,
            submitter: AppointmentSubmitter::new(),
            chatbot: ChatbotVisibility::new(),
        }
    }
}
