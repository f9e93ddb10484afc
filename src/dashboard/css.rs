//! Dashboard CSS styles
//!
//! Contains all styling for the coin dashboard UI.
//! Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
    --yellow: #d29922;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    padding: 20px;
    min-height: 100vh;
}

.page { max-width: 1200px; margin: 0 auto; }

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 16px;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 24px; font-weight: 600; margin-bottom: 16px; }
header h1 { margin-bottom: 0; }

.followed { font-size: 12px; color: var(--text-dim); }

nav { display: flex; gap: 16px; }

.nav-link {
    color: var(--text-dim);
    text-decoration: none;
    font-weight: 500;
    padding-bottom: 4px;
    border-bottom: 2px solid transparent;
}

.nav-link.active { color: var(--text); border-bottom-color: var(--blue); }

#search {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 6px;
    color: var(--text);
    padding: 8px 12px;
    min-width: 240px;
}

#search[hidden] { display: none; }

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--blue); color: #fff; }
.btn-primary:hover:not(:disabled) { background: #4c9aed; }
.btn-secondary { background: var(--border); color: var(--text); }
.btn-secondary:hover:not(:disabled) { background: #3d444d; }

.btn-close {
    background: none;
    border: none;
    color: var(--text-dim);
    font-size: 16px;
    cursor: pointer;
}

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(170px, 1fr));
    gap: 16px;
}

.loading, .no-matches { color: var(--text-dim); grid-column: 1 / -1; }

/* Cards */
.card, .coin-card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 16px;
}

.coin-card {
    display: flex;
    flex-direction: column;
    align-items: center;
    text-align: center;
    gap: 6px;
}

.coin-card .switch { align-self: flex-end; }
.coin-card .more-info-btn { margin-top: auto; }

.coin-image { width: 50px; height: 50px; border-radius: 50%; }
.coin-name { font-size: 15px; font-weight: 600; }
.coin-symbol { font-size: 12px; color: var(--text-dim); text-transform: uppercase; }

/* Detail panel */
.collapse { display: none; width: 100%; margin-top: 8px; }
.collapse.show { display: block; }

.price-row {
    display: flex;
    justify-content: space-between;
    font-size: 13px;
    padding: 2px 0;
}

.currency { color: var(--text-dim); }

/* Switch */
.switch { position: relative; display: inline-block; width: 36px; height: 20px; }
.switch input { opacity: 0; width: 0; height: 0; }

.slider {
    position: absolute;
    inset: 0;
    background: var(--border);
    border-radius: 20px;
    cursor: pointer;
    transition: 0.2s;
}

.slider::before {
    content: '';
    position: absolute;
    width: 14px;
    height: 14px;
    left: 3px;
    top: 3px;
    background: var(--text);
    border-radius: 50%;
    transition: 0.2s;
}

.switch input:checked + .slider { background: var(--green); }
.switch input:checked + .slider::before { transform: translateX(16px); }

/* Placeholder panels */
.placeholder { color: var(--text-dim); font-size: 16px; }
.about p { margin-bottom: 12px; line-height: 1.5; }

/* Replacement dialog */
.modal-backdrop {
    position: fixed;
    inset: 0;
    background: rgba(0, 0, 0, 0.6);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 10;
}

.modal-backdrop[hidden] { display: none; }

.modal {
    background: var(--bg);
    border: 1px solid var(--border);
    border-radius: 12px;
    width: min(920px, 95vw);
    padding: 20px;
}

.modal-header, .modal-footer {
    display: flex;
    justify-content: space-between;
    align-items: center;
}

.modal-footer { justify-content: flex-end; gap: 8px; margin-top: 16px; }
.modal-title { font-weight: 600; }
.modal-hint { color: var(--text-dim); font-size: 13px; margin: 12px 0; }

.modal-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(150px, 1fr));
    gap: 12px;
}

/* Notifications */
.toasts {
    position: fixed;
    top: 20px;
    right: 20px;
    display: flex;
    flex-direction: column;
    gap: 8px;
    z-index: 20;
}

.toast {
    padding: 12px 16px;
    border-radius: 8px;
    font-size: 13px;
    max-width: 320px;
    cursor: pointer;
}

.toast-error { background: rgba(248, 81, 73, 0.9); color: #fff; }
.toast-warning { background: rgba(210, 153, 34, 0.9); color: #fff; }
.toast-info { background: rgba(88, 166, 255, 0.9); color: #fff; }

/* Responsive */
@media (max-width: 600px) {
    header { flex-direction: column; gap: 12px; }
    #search { min-width: 0; width: 100%; }
}
";
