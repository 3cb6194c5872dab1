use gpui::actions;

actions!(
    rexplorer,
    [
        Refresh,
        // Value panel
        ZoomIn,
        ZoomOut,
        ResetZoom,
        CopyValue,
        CopyMarkup,
        // Key tree navigation
        SelectNext,
        SelectPrev,
        SelectFirst,
        SelectLast,
        Expand,
        Collapse,
        Activate,
    ]
);
