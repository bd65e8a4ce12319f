use std::sync::Arc;

use crate::adapters::{
    ConsoleReporter, FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, JsonReportAdapter,
    ReportFanout,
};
use crate::app::{
    batch_interactor::BatchInteractor, convert_interactor::ConvertInteractor,
    inspect_interactor::InspectInteractor,
};
use crate::config_initialization::Settings;
use crate::domain::rules::RetryPolicy;
use crate::ports::{EncodePort, FsPort, ProbePort, ReportPort};

pub trait AppContainer: Send + Sync {
    fn batch_interactor(&self) -> Arc<BatchInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    batch_interactor: Arc<BatchInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    pub fn new(settings: &Settings) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(&settings.ffprobe));
        let encode_port = Arc::new(FFmpegAdapter::new(&settings.ffmpeg));
        let fs_port = Arc::new(FsLocalAdapter::new());

        let mut reporters: Vec<Arc<dyn ReportPort>> =
            vec![Arc::new(ConsoleReporter::new(&settings.output_dir))];
        if let Some(report_path) = &settings.report {
            reporters.push(Arc::new(JsonReportAdapter::new(report_path)));
        }
        let reporter = Arc::new(ReportFanout::new(reporters));

        let policy = RetryPolicy {
            max_attempts: settings.max_attempts,
            ..RetryPolicy::default()
        };
        let convert_interactor = Arc::new(
            ConvertInteractor::new(
                Arc::clone(&probe_port) as Arc<dyn ProbePort>,
                Arc::clone(&encode_port) as Arc<dyn EncodePort>,
                Arc::clone(&fs_port) as Arc<dyn FsPort>,
            )
            .with_policy(policy)
            .with_encode_timeout(settings.encode_timeout),
        );

        let batch_interactor = Arc::new(BatchInteractor::new(
            convert_interactor,
            Arc::clone(&encode_port) as Arc<dyn EncodePort>,
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            reporter as Arc<dyn ReportPort>,
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
        ));

        Self {
            batch_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}
