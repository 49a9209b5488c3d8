use crate::context::Context;
use crate::error::Result;
use crate::exception::call_tdv;
use crate::handle::NativeObject;
use std::sync::Arc;
use tracing::trace;

/// A configurable processing unit (detector, fitter, estimator, ...)
/// created with [`crate::FacerecService::create_processing_block`].
///
/// Input and output travel through one [`Context`]: the caller fills in the
/// image and previous results, and the block adds its own.
#[derive(Debug, Clone)]
pub struct ProcessingBlock {
    object: Arc<NativeObject>,
}

impl ProcessingBlock {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self { object }
    }

    /// Runs the block on `context` in place.
    pub fn process(&self, context: &mut Context) -> Result<()> {
        trace!("Processing context {:?}", context);
        let api = self.object.api();
        call_tdv(api, |e| unsafe {
            api.tdv_processing_block_process_context(self.object.raw(), context.raw(), e)
        })
    }
}
