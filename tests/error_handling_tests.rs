use crossbeam_channel::{bounded, Receiver, Sender};
use mockall::mock;
use rtsp_logging::fs::{DirectoryCreator, OsDirectories};
use rtsp_logging::{
    rtsp_error, rtsp_information, ComponentId, Initialization, LoggerConfig, LoggerRegistry, LoggingError,
    NamedLoggerInitializer, Severity,
};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

mock! {
    Directories {}

    impl DirectoryCreator for Directories {
        fn ensure_dir(&self, path: &Path) -> io::Result<()>;
    }
}

fn failing_directories(times: usize) -> Arc<MockDirectories> {
    let mut directories = MockDirectories::new();
    directories
        .expect_ensure_dir()
        .times(times)
        .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume")));
    Arc::new(directories)
}

#[test]
fn test_directory_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let log_dir = temp.path().join("logs");

    let initializer = NamedLoggerInitializer::for_component(
        registry.clone(),
        ComponentId::RtspServer,
        LoggerConfig::new(&log_dir),
    )
    .with_directories(failing_directories(1));

    match initializer.initialize() {
        Err(LoggingError::CreateDirectory { path, source }) => {
            assert_eq!(path, log_dir);
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected a directory error, got {other:?}"),
    }

    assert!(!initializer.is_initialized());
    assert!(!registry.is_configured("MainServer.RtspServer"));
    // The logger is left unconfigured
    assert_eq!(
        registry.component(ComponentId::RtspServer).level(),
        Severity::Information
    );
}

#[test]
fn test_retry_after_directory_failure() {
    let temp = TempDir::new().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let config = LoggerConfig::new(temp.path().join("logs"));

    let failing = NamedLoggerInitializer::for_component(registry.clone(), ComponentId::RtspServer, config.clone())
        .with_directories(failing_directories(1));
    assert!(failing.initialize().is_err());

    // The failed attempt released its claim, so a later initializer can succeed
    let working = NamedLoggerInitializer::for_component(registry.clone(), ComponentId::RtspServer, config)
        .with_directories(Arc::new(OsDirectories));
    assert_eq!(working.initialize().unwrap(), Initialization::Configured);

    let logger = working.logger();
    rtsp_information!(logger, "recovered");
    logger.flush();

    let content = fs::read_to_string(working.log_file_path()).unwrap();
    assert!(content.ends_with("\trecovered\n"), "{content:?}");
}

#[test]
fn test_same_initializer_can_retry() {
    let temp = TempDir::new().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let log_dir = temp.path().join("logs");

    let mut directories = MockDirectories::new();
    let mut attempts = 0;
    directories.expect_ensure_dir().times(2).returning(move |path| {
        attempts += 1;
        if attempts == 1 {
            Err(io::Error::new(io::ErrorKind::Other, "transient"))
        } else {
            fs::create_dir_all(path)
        }
    });

    let initializer = NamedLoggerInitializer::new(registry, "Retry", LoggerConfig::new(&log_dir))
        .with_directories(Arc::new(directories));

    assert!(initializer.initialize().is_err());
    assert_eq!(initializer.initialize().unwrap(), Initialization::Configured);
    assert!(log_dir.is_dir());
}

/// Signals when directory creation starts, then fails once released.
struct GatedFailure {
    entered: Sender<()>,
    release: Receiver<()>,
}

impl DirectoryCreator for GatedFailure {
    fn ensure_dir(&self, _path: &Path) -> io::Result<()> {
        let _ = self.entered.send(());
        let _ = self.release.recv();
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
    }
}

#[test]
fn test_refused_initializer_retries_after_claimant_fails() {
    let temp = TempDir::new().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let config = LoggerConfig::new(temp.path().join("logs"));
    let (entered_tx, entered_rx) = bounded(1);
    let (release_tx, release_rx) = bounded(1);

    let claimant = Arc::new(
        NamedLoggerInitializer::new(registry.clone(), "Contended", config.clone()).with_directories(Arc::new(
            GatedFailure {
                entered: entered_tx,
                release: release_rx,
            },
        )),
    );
    let handle = thread::spawn({
        let claimant = claimant.clone();
        move || claimant.initialize()
    });

    // The claimant holds the name while its install is still running
    entered_rx.recv().unwrap();
    let second = NamedLoggerInitializer::new(registry.clone(), "Contended", config);
    assert_eq!(second.initialize().unwrap(), Initialization::ConfiguredElsewhere);
    assert!(!second.is_initialized());

    release_tx.send(()).unwrap();
    assert!(matches!(
        handle.join().unwrap(),
        Err(LoggingError::CreateDirectory { .. })
    ));
    assert!(!registry.is_configured("Contended"));

    assert_eq!(second.initialize().unwrap(), Initialization::Configured);
    assert!(second.is_initialized());
    assert_eq!(registry.get("Contended").level(), Severity::Trace);
}

#[test]
fn test_empty_directory_never_touches_the_filesystem() {
    let registry = Arc::new(LoggerRegistry::new());
    let initializer = NamedLoggerInitializer::for_component(registry.clone(), ComponentId::RtspServer, LoggerConfig::new(""))
        .with_directories(failing_directories(0));

    assert!(matches!(initializer.initialize(), Err(LoggingError::EmptyLogDirectory)));
    assert!(!registry.is_configured("MainServer.RtspServer"));
}

#[test]
fn test_file_in_place_of_directory() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("logs");
    fs::write(&blocker, b"not a directory").unwrap();

    let registry = Arc::new(LoggerRegistry::new());
    let initializer = NamedLoggerInitializer::for_component(registry, ComponentId::RtspServer, LoggerConfig::new(&blocker));

    assert!(matches!(
        initializer.initialize(),
        Err(LoggingError::CreateDirectory { .. })
    ));
    assert!(blocker.is_file());
}

#[test]
fn test_log_path_occupied_by_a_directory() {
    let temp = TempDir::new().unwrap();
    let log_dir = temp.path().join("logs");
    // The log file is opened lazily, so the problem only shows up on the first record
    fs::create_dir_all(log_dir.join("MainServer.RtspServer.log")).unwrap();

    let registry = Arc::new(LoggerRegistry::new());
    let initializer = NamedLoggerInitializer::for_component(registry.clone(), ComponentId::RtspServer, LoggerConfig::new(&log_dir));
    assert_eq!(initializer.initialize().unwrap(), Initialization::Configured);

    let logger = initializer.logger();
    rtsp_information!(logger, "dropped, not panicking");
    logger.flush();
    registry.shutdown();

    assert!(log_dir.join("MainServer.RtspServer.log").is_dir());
}

#[test]
fn test_directory_removed_while_running() {
    let temp = TempDir::new().unwrap();
    let log_dir = temp.path().join("logs");
    let registry = Arc::new(LoggerRegistry::new());

    let initializer = NamedLoggerInitializer::for_component(registry.clone(), ComponentId::RtspServer, LoggerConfig::new(&log_dir));
    initializer.initialize().unwrap();
    let logger = initializer.logger();

    rtsp_information!(logger, "before removal");
    logger.flush();
    fs::remove_dir_all(&log_dir).unwrap();

    // Write failures are reported as diagnostics, never as panics in the caller
    for i in 0..10 {
        rtsp_error!(logger, "after removal {}", i);
    }
    logger.flush();
    registry.shutdown();
}

#[test]
fn test_unknown_names_are_errors() {
    assert!(matches!(
        "Verbose".parse::<Severity>(),
        Err(LoggingError::UnknownSeverity(name)) if name == "Verbose"
    ));
    assert!(matches!(
        "MainServer.Nope".parse::<ComponentId>(),
        Err(LoggingError::UnknownComponent(_))
    ));
}
