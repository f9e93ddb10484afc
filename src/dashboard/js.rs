//! Dashboard JavaScript
//!
//! Thin UI layer over the dashboard API:
//! - Panel switching and search re-render server-side markup
//! - Selection switches and the replacement dialog post commands
//! - Detail panels fetch once, then collapse/expand locally
//! - Notifications auto-dismiss after the delay sent by the server

pub const SCRIPT: &str = r#"
// ============================================================================
// State
// ============================================================================
const state = {
    panel: 'currencies',
    query: ''
};

const container = document.getElementById('container');
const mainContent = document.getElementById('mainContent');
const search = document.getElementById('search');
const modal = document.getElementById('replacementModal');
const modalBody = document.getElementById('replacementModalBody');

// ============================================================================
// API Functions
// ============================================================================
async function fetchJSON(endpoint, options) {
    try {
        const res = await fetch(endpoint, options);
        const data = await res.json();
        if (data && data.notification) showNotification(data.notification);
        return data;
    } catch (e) {
        console.error(`Error fetching ${endpoint}:`, e);
        showNotification({ id: 'net-' + Date.now(), level: 'error', message: 'Network error. Please try again.', dismiss_after_ms: 5000 });
        return null;
    }
}

function postJSON(endpoint, body) {
    return fetchJSON(endpoint, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body || {})
    });
}

// ============================================================================
// Notifications
// ============================================================================
function showNotification(n) {
    const toast = document.createElement('div');
    toast.className = 'toast toast-' + (n.level || 'error');
    toast.dataset.id = n.id;
    toast.textContent = n.message;
    toast.addEventListener('click', () => toast.remove());
    document.getElementById('toasts').appendChild(toast);
    setTimeout(() => toast.remove(), n.dismiss_after_ms || 5000);
}

// ============================================================================
// UI Update Functions
// ============================================================================
function updateFollowed(selection) {
    if (!selection) return;
    document.getElementById('followedCount').textContent = selection.length + '/5 followed';
}

function showGrid(grid) {
    if (!grid) return;
    container.innerHTML = grid.html;
    if (grid.notification) showNotification(grid.notification);
}

async function loadView(panel) {
    const params = new URLSearchParams({ panel, q: state.query });
    const view = await fetchJSON('/api/view?' + params);
    if (!view) return;

    state.panel = view.panel;
    document.title = view.title + ' | Crypto Coins';
    mainContent.innerHTML = view.header_html;
    container.innerHTML = '';
    showGrid(view.grid);
    search.hidden = view.panel !== 'currencies';

    document.querySelectorAll('.nav-link').forEach(link => {
        link.classList.toggle('active', link.dataset.panel === view.panel);
    });
}

async function runSearch() {
    const params = new URLSearchParams({ q: state.query });
    showGrid(await fetchJSON('/api/coins?' + params));
}

// ============================================================================
// Selection + replacement dialog
// ============================================================================
async function onSwitchChange(input) {
    const coinId = input.dataset.coinId;
    const result = await postJSON('/api/selection/toggle', { coin_id: coinId, enabled: input.checked });
    if (!result || result.error) {
        input.checked = !input.checked;
        return;
    }

    input.checked = result.checked;
    updateFollowed(result.selection);
    if (result.replacement_html) openModal(result.replacement_html);
}

function openModal(html) {
    modalBody.innerHTML = html;
    modal.hidden = false;
}

function closeModal() {
    modal.hidden = true;
    modalBody.innerHTML = '';
}

async function confirmReplacement() {
    const evict = Array.from(modalBody.querySelectorAll('.modal-coin-switch'))
        .filter(input => !input.checked)
        .map(input => input.dataset.coinId);

    const result = await postJSON('/api/replacement/confirm', { evict, q: state.query });
    if (!result || !result.confirmed) return; // dialog stays open

    closeModal();
    updateFollowed(result.selection);
    if (state.panel === 'currencies') showGrid(result.grid);
}

async function cancelReplacement() {
    closeModal();
    await postJSON('/api/replacement/cancel');
}

// ============================================================================
// Detail panels
// ============================================================================
function formatPrice(value) {
    return value == null ? '--' : String(value);
}

async function onMoreInfo(button) {
    const coinId = button.dataset.coinId;
    const panel = document.getElementById('collapse-' + coinId);
    if (!panel) return;

    if (panel.classList.contains('show')) {
        panel.classList.remove('show');
        return;
    }
    if (panel.dataset.loaded === 'true') {
        panel.classList.add('show');
        return;
    }

    button.disabled = true;
    button.textContent = '⏳ Loading...';
    const detail = await fetchJSON('/api/detail?' + new URLSearchParams({ id: coinId }));
    button.disabled = false;
    button.textContent = 'More Info';

    // The grid may have been re-rendered while the request was in flight
    if (!panel.isConnected || !detail || !detail.prices) return;

    document.getElementById('price-usd-' + coinId).textContent = formatPrice(detail.prices.usd);
    document.getElementById('price-eur-' + coinId).textContent = formatPrice(detail.prices.eur);
    document.getElementById('price-ils-' + coinId).textContent = formatPrice(detail.prices.ils);
    panel.dataset.loaded = 'true';
    panel.classList.add('show');
}

// ============================================================================
// Event wiring
// ============================================================================
container.addEventListener('change', event => {
    if (event.target.classList.contains('coin-switch')) onSwitchChange(event.target);
});

container.addEventListener('click', event => {
    const button = event.target.closest('.more-info-btn');
    if (button) onMoreInfo(button);
});

search.addEventListener('input', event => {
    state.query = event.target.value;
    runSearch();
});

document.querySelectorAll('.nav-link').forEach(link => {
    link.addEventListener('click', event => {
        event.preventDefault();
        loadView(link.dataset.panel);
    });
});

document.getElementById('replaceButton').addEventListener('click', confirmReplacement);
document.getElementById('cancelButton').addEventListener('click', cancelReplacement);
document.getElementById('closeWindowButton').addEventListener('click', cancelReplacement);

window.addEventListener('beforeunload', () => {
    navigator.sendBeacon('/api/selection/flush');
});

// ============================================================================
// Initialization
// ============================================================================
(async () => {
    const selection = await fetchJSON('/api/selection');
    if (selection) {
        updateFollowed(selection.coins.map(c => c.id));
        // A dialog left open by a previous page load is discarded
        if (selection.pending_replacement) await postJSON('/api/replacement/cancel');
    }
    await loadView('currencies');
})();
"#;
