mod nameserver_selection;

pub use nameserver_selection::NameserverSelectionService;
