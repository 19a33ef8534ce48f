//! Assembly of the standard database-to-database transport.

use std::sync::Arc;

use ferry_core::ActionId;
use ferry_transport::{TransportAction, TransportContext, TransportKind};

use crate::binding::BindParametersHandler;
use crate::command::SharedCommand;
use crate::provider::DataProvider;
use crate::sink::DbRecordSink;
use crate::source::DbRecordSource;

/// Builds the standard move-shaped transport: query `source`, bind each
/// row's values onto `destination`'s parameters, execute `destination`
/// once per row.
///
/// The caller still runs [`setup`](TransportAction::setup) before
/// [`execute`](TransportAction::execute); that is where the parameter
/// registration happens and where a missing source schema surfaces.
#[must_use]
pub fn standard_transport(
    id: ActionId,
    provider: Arc<dyn DataProvider>,
    source: SharedCommand,
    destination: SharedCommand,
    context: TransportContext,
) -> TransportAction {
    let binder =
        BindParametersHandler::new(provider, Arc::clone(&source), Arc::clone(&destination));
    TransportAction::new(
        id,
        Box::new(DbRecordSource::new(source)),
        Box::new(DbRecordSink::new(destination)),
    )
    .with_kind(TransportKind::Move)
    .with_context(context)
    .with_handler(Box::new(binder))
}
